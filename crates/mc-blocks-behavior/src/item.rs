//! Items held by actors and produced as drops.

use serde::{Deserialize, Serialize};

use mc_blocks_state::{BlockKind, CoralType, TreeType};

/// Tool types relevant for drop gating and interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolType {
    None,
    Pickaxe,
    Axe,
    Shovel,
    Hoe,
    Sword,
    Shears,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// The item form of a block.
    Block(BlockKind),
    Tool(ToolType),
    /// Bone meal.
    Fertilizer,
    Apple,
    Stick,
    Sapling(TreeType),
    Snowball,
    RedstoneDust,
    DeadCoralBlock(CoralType),
}

/// A stack of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    pub count: u8,
    /// Durability used so far. Only meaningful for tools.
    pub damage: u16,
}

impl Item {
    /// Durability of every tool, matching a wooden tier tool.
    pub const TOOL_DURABILITY: u16 = 59;

    pub fn new(kind: ItemKind, count: u8) -> Self {
        Self {
            kind,
            count,
            damage: 0,
        }
    }

    /// An empty hand.
    pub fn empty() -> Self {
        Self::new(ItemKind::Block(BlockKind::Air), 0)
    }

    pub fn block(kind: BlockKind) -> Self {
        Self::new(ItemKind::Block(kind), 1)
    }

    pub fn tool(tool: ToolType) -> Self {
        Self::new(ItemKind::Tool(tool), 1)
    }

    pub fn is_null(&self) -> bool {
        self.count == 0 || self.kind == ItemKind::Block(BlockKind::Air)
    }

    pub fn tool_type(&self) -> ToolType {
        match self.kind {
            ItemKind::Tool(tool) if !self.is_null() => tool,
            _ => ToolType::None,
        }
    }

    /// Use up `amount` durability. Returns true if the tool broke.
    pub fn apply_damage(&mut self, amount: u16) -> bool {
        if !matches!(self.kind, ItemKind::Tool(_)) || self.is_null() {
            return false;
        }
        self.damage = self.damage.saturating_add(amount);
        if self.damage >= Self::TOOL_DURABILITY {
            self.pop();
            return true;
        }
        false
    }

    /// Remove one item from the stack.
    pub fn pop(&mut self) {
        self.count = self.count.saturating_sub(1);
    }
}

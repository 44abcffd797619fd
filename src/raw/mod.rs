mod arena;
mod handle;
mod node;
mod raw_wb_tree;

pub(crate) use handle::Handle;
pub(crate) use node::Side;
pub(crate) use raw_wb_tree::{Descend, HandleBatch, RawWBTree, Slot, Visit};

pub mod tree_overlay;

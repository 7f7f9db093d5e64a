pub mod shaded;

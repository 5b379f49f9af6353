pub mod wallhaven;

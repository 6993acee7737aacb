mod palette;
mod scene;

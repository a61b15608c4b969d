mod cells;
mod files;
mod sheet_features;
mod styles;

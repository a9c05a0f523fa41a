// Copyright (c) 2025, Tom Ouellette
// Licensed under the BSD 3-Clause License

// All currently supported source mask formats
pub const MASK_IMAGE_FORMATS: [&str; 1] = ["png"];

// All currently supported annotation formats
pub const ANNOTATION_FORMATS: [&str; 1] = ["json"];

// The background sentinel color, never registered as a category
pub const BACKGROUND: [u8; 3] = [0, 0, 0];

// Suffix appended to batch names when deriving task names
pub const TASK_SUFFIX: &str = "-seg";

// Task descriptor version understood by the review tool
pub const TASK_VERSION: &str = "0.9";

// Plugin and data type recorded in emitted task descriptors
pub const PLUGIN_SEGMENTATION: &str = "segmentation";
pub const DATA_TYPE_IMAGE: &str = "image";

// Canonical frame resolution for polygon rasterization
pub const FRAME_WIDTH: u32 = 1280;
pub const FRAME_HEIGHT: u32 = 800;

// Category id written for every filled polygon pixel
pub const FOREGROUND_ID: u32 = 1;

// Prefix for masks embedded in annotation records as data URLs
pub const MASK_DATA_URL_PREFIX: &str = "data:image/png;base64,";

mod record;
mod registry;

pub use record::Annotation;
pub use record::AnnotationFile;
pub use record::Category;
pub use record::DataRecord;
pub use record::Geometry;
pub use record::LabelSchema;
pub use record::PolygonObject;
pub use record::TaskDataset;
pub use record::TaskDescriptor;
pub use record::TaskSpec;
pub use record::category_name;

pub use registry::ColorRegistry;

/// External representations of instances and solutions (JSON)
pub mod ext_repr;

/// Converting external representations into internal entities
pub mod import;

/// Converting nesting outcomes into external representations
pub mod export;

/// Rendering of nesting outcomes as SVG
pub mod svg;

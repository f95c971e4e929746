mod edge;
mod point;
mod rect;

#[doc(inline)]
pub use edge::Edge;
#[doc(inline)]
pub use point::Point;
#[doc(inline)]
pub use point::Vector;
#[doc(inline)]
pub use rect::Rect;

mod pass;
mod search;

#[doc(inline)]
pub use pass::NestOneResult;
#[doc(inline)]
pub use pass::NestedRecord;
#[doc(inline)]
pub use pass::NestingOutcome;
#[doc(inline)]
pub use pass::nest;
#[doc(inline)]
pub use pass::nest_one;
#[doc(inline)]
pub use pass::nest_with_engine;
#[doc(inline)]
pub use search::HoleObstacle;
#[doc(inline)]
pub use search::Placement;
#[doc(inline)]
pub use search::PlacementCost;
#[doc(inline)]
pub use search::inner_fit;
#[doc(inline)]
pub use search::nest_by_bounding_boxes;

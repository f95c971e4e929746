mod entity;
mod nesting;
mod nesting_state;
mod part;

#[doc(inline)]
pub use entity::CircleMeta;
#[doc(inline)]
pub use entity::Entity;
#[doc(inline)]
pub use nesting::DesignDocumentPart;
#[doc(inline)]
pub use nesting::Nesting;
#[doc(inline)]
pub use nesting_state::NestedPart;
#[doc(inline)]
pub use nesting_state::NestedPartOrigin;
#[doc(inline)]
pub use nesting_state::NestingState;
#[doc(inline)]
pub use nesting_state::PartKey;
#[doc(inline)]
pub use part::Part;

//! SeaORM entity models
//!
//! Database entities for the ScholNet snapshot store

mod author;
mod venue;
mod work;

pub use work::{
    Entity as WorkEntity,
    Model as Work,
    ActiveModel as WorkActiveModel,
    Column as WorkColumn,
};

pub use author::{
    Entity as AuthorEntity,
    Model as Author,
    ActiveModel as AuthorActiveModel,
    Column as AuthorColumn,
};

pub use venue::{
    Entity as VenueEntity,
    Model as Venue,
    ActiveModel as VenueActiveModel,
    Column as VenueColumn,
};

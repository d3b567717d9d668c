//! Derived graphs
//!
//! The directed citation network, the undirected weighted co-authorship
//! network, and the component/partition helpers shared by both.

pub mod citation;
pub mod coauthor;
pub mod community;

pub use citation::{CitationGraph, NodeData};
pub use coauthor::{AuthorData, AuthorId, CoauthorGraph};
pub use community::{connected_components, Partition};

/// UI module exports
pub mod group_list;
pub mod popup;
pub mod snapshot_card;

//! Action creators bound to a dispatch function.

mod bind;

pub use bind::{
    action_creator, bind_action_creator, bind_action_creators, ActionCreator, BoundActionCreator,
};

pub mod composer;
pub mod draft;
pub mod lookup;
pub mod model;
pub mod service;

pub mod app;
pub mod client;
pub mod command;
pub mod config;
pub mod drawer;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod model;
pub mod query;
pub mod render;
pub mod state;

pub use app::Browser;
pub use client::{MealDbClient, MealSource};
pub use config::BrowserConfig;
pub use drawer::{Clock, CloseReason, Drawer, DrawerEvent, DrawerPhase, ManualClock, SystemClock};
pub use error::BrowserError;
pub use filter::filter_by_name;
pub use model::{Area, Category, Ingredient, MealDetail, MealSummary};
pub use query::{Fetched, Payload, QueryCache, QueryKey};
pub use state::{Tab, ViewState};

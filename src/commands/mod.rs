pub mod efficiency;
pub mod input;
pub mod menu;
pub mod monitor;
pub mod output;
pub mod recommend;
pub mod reset;
pub mod run;
pub mod status;
pub mod summary;

pub mod creation;

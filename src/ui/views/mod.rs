pub mod run;
pub mod scope;
pub mod watch;

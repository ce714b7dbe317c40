pub mod helper;
pub mod init;
pub mod run;
pub mod watch;

pub mod join;
pub mod names;
pub mod part;
pub mod privmsg;
pub mod topic;
pub mod who;

pub mod ask;
pub mod doctor;
pub mod hours;
pub mod init;
pub mod serve;

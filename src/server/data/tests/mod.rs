mod cad;
mod notification;
mod scheduler_run;
mod user;

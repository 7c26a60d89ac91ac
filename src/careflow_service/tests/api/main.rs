mod helpers;
mod login;
mod oauth;
mod profile;
mod refresh;
mod register;
mod role_gate;
mod verify_email;

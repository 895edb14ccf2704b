mod admin_test;
mod helpers;
mod profile_test;
mod router_test;
mod session_test;

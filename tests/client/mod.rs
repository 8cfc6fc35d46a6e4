mod csrf_tests;
mod service_tests;

mod health_tests;
mod proxy_tests;
mod redeem_tests;

//! Contract test harness for async_runtime

mod contract_test;

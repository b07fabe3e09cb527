mod serde_tests;

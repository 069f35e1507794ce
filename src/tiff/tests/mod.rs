//! Tests and fixtures for the TIFF reader

mod byte_order_tests;

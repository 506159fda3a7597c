// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_query_summary::error::{config_error, file_read_error, output_error};

#[test]
fn test_file_read_error() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = file_read_error("/path/to/file.sql", io_error);
    let _msg = error.to_string();
}

#[test]
fn test_config_error() {
    let error = config_error("Invalid cache size");
    let _msg = error.to_string();
}

#[test]
fn test_config_error_from_string() {
    let error = config_error(String::from("Dynamic message"));
    let _msg = error.to_string();
}

#[test]
fn test_output_error() {
    let error = output_error("JSON", "unexpected value");
    let _msg = error.to_string();
}

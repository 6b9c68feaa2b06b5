#![allow(dead_code)]

extern crate env_logger;

use std::path::PathBuf;

pub fn get_test_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(file!());
    path.pop();
    path.pop();
    path.push(filename);
    path
}

pub fn init_test() {
    let _ = self::env_logger::builder().is_test(true).try_init();
}

//! UI module - interactive command line interface

pub mod cli;

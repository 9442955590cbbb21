// Kernel test module
#[cfg(test)]
mod common;
#[cfg(test)]
mod lookup_tests;

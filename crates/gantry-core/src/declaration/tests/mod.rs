#[cfg(test)]
mod bundle_tests;
#[cfg(test)]
mod registry_tests;

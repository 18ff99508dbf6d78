#[cfg(test)]
mod shapefile_tests;
#[cfg(test)]
mod kml_tests;
#[cfg(test)]
mod factory_tests;

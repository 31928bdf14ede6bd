#![allow(dead_code)]

mod registry;
mod site_packages;

#[allow(unused_imports)]
pub use registry::MockRegistry;
#[allow(unused_imports)]
pub use site_packages::SitePackagesFixture;

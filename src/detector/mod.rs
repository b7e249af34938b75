//! # Detector Module
//!
//! Read-only detectors that extract deployment metadata from a parsed
//! manifest. Every detector is best-effort: a missing or unexpected
//! configuration shape yields "nothing detected", never an error.
//!
//! ## Key Components
//!
//! - **plugins**: allowlist of deployment-relevant build plugins
//! - **container**: container image coordinates from Jib, Spring Boot
//!   build-image, Quarkus, Fabric8, Micronaut and JKube
//! - **assembly**: archives produced by `maven-assembly-plugin`
//! - **metadata**: Java version, local dependencies, final name, repository
//!   location
//! - **inventory**: build plugin inventory with masked configuration
//! - **build_info**: git commit, branch, tag and CI metadata of the checkout
//!
//! ## Example
//!
//! ```
//! use std::path::Path;
//!
//! use deploy_descriptor::detector::{detect_container, detect_plugins};
//! use deploy_descriptor::manifest::PomModel;
//!
//! # fn main() -> miette::Result<()> {
//! let pom = PomModel::parse_str(
//!     r#"<project>
//!          <groupId>com.acme</groupId><artifactId>api</artifactId><version>1.0</version>
//!          <build><plugins><plugin>
//!            <groupId>com.google.cloud.tools</groupId>
//!            <artifactId>jib-maven-plugin</artifactId>
//!            <configuration><to><image>ghcr.io/acme/api</image></to></configuration>
//!          </plugin></plugins></build>
//!        </project>"#,
//!     Path::new("api/pom.xml"),
//! )?;
//!
//! assert_eq!(detect_plugins(&pom), vec!["jib-maven-plugin"]);
//!
//! let image = detect_container(&pom, pom.directory()).unwrap();
//! assert_eq!(image.registry.as_deref(), Some("ghcr.io"));
//! # Ok(())
//! # }
//! ```

pub mod assembly;
pub mod build_info;
pub mod container;
pub mod inventory;
pub mod metadata;
pub mod plugins;

pub use assembly::{AssemblyArtifact, detect_assemblies};
pub use build_info::{BuildInfo, CiInfo, collect_build_info};
pub use container::{ContainerImageSpec, detect_container};
pub use inventory::{InventoryOptions, PluginInventory, collect_plugins};
pub use plugins::detect_plugins;

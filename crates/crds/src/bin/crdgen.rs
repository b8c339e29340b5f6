//! Prints the hardware profile CRDs as a multi-document YAML stream.
//!
//! Usage: `cargo run -p crds --bin crdgen > crds.yaml`

use crds::{DashboardHardwareProfile, HardwareProfile};
use kube::CustomResourceExt;

fn main() -> anyhow::Result<()> {
    let crds = [DashboardHardwareProfile::crd(), HardwareProfile::crd()];
    for crd in &crds {
        print!("---\n{}", serde_yaml::to_string(crd)?);
    }
    Ok(())
}

//! Prints the OmsOperator CustomResourceDefinition as YAML.

use crds::OmsOperator;
use kube::CustomResourceExt;

fn main() -> anyhow::Result<()> {
    let crd = serde_yaml::to_string(&OmsOperator::crd())?;
    println!("{crd}");
    Ok(())
}

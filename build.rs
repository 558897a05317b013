//! Retrieves information about the version of the crate from Git and the build
//! environment so that the driver can report it at runtime.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}

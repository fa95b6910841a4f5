pub mod client;
pub mod operation;

use minijinja::Environment;

use crate::escape;

pub const CLIENT_TEMPLATE: &str = "client.swift.j2";
pub const OPERATION_TEMPLATE: &str = "operation.swift.j2";

/// Template environment shared by the client and operation emitters.
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_filter("swift_string", escape::swift_string);
    env.add_filter("swift_comment", escape::swift_comment);
    env.add_template(
        CLIENT_TEMPLATE,
        include_str!("../../templates/client.swift.j2"),
    )?;
    env.add_template(
        OPERATION_TEMPLATE,
        include_str!("../../templates/operation.swift.j2"),
    )?;
    Ok(env)
}

use minijinja::{Environment, context};
use rgen_core::ir::{IrServer, IrSpec};

use super::CLIENT_TEMPLATE;
use super::operation::emit_operation;
use crate::escape::flag_identifier;
use crate::generator::SwiftClientOptions;

/// Author used when neither the options nor the spec name one.
pub const DEFAULT_AUTHOR: &str = "A Robot";

/// Emit the full source of the client for one server. Every operation of
/// the spec becomes one method, in order.
pub fn emit_client(
    env: &Environment<'_>,
    ir: &IrSpec,
    server: &IrServer,
    options: &SwiftClientOptions,
) -> Result<String, minijinja::Error> {
    let name = server.display_name(&ir.info.title);
    flag_identifier("client", &name);
    flag_identifier("module", &options.runtime_module);
    flag_identifier("cache policy", &options.cache_policy);

    let methods = ir
        .operations
        .iter()
        .map(|op| emit_operation(env, op, options.type_naming))
        .collect::<Result<Vec<_>, _>>()?;

    let author = options
        .author
        .as_deref()
        .or(ir.info.contact_name.as_deref())
        .unwrap_or(DEFAULT_AUTHOR);

    let tmpl = env.get_template(CLIENT_TEMPLATE)?;
    tmpl.render(context! {
        name => name,
        author => author,
        date => options.date.format("%b %-d, %Y").to_string(),
        runtime_module => options.runtime_module.clone(),
        // Debug keeps the decimal point: `60.0`, not `60`.
        timeout => format!("{:?}", options.timeout),
        cache_policy => options.cache_policy.clone(),
        url => server.url.clone(),
        methods => methods,
    })
}

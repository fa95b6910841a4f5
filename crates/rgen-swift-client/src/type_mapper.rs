use rgen_core::config::TypeNaming;
use rgen_core::ir::IrType;
use rgen_core::transform::casing::pascal_case;

/// Permissive type used when a schema declares nothing usable.
pub const ANY: &str = "Any";

/// Map an `IrType` to the Swift type written in a method signature.
pub fn ir_type_to_swift(ir_type: &IrType, naming: TypeNaming) -> String {
    match naming {
        TypeNaming::Pascal => pascal_keyword(ir_type),
        TypeNaming::Native => native(ir_type),
    }
}

/// The declared keyword, pascal-cased: `string` → `String`, `integer` → `Integer`.
fn pascal_keyword(ir_type: &IrType) -> String {
    ir_type
        .keyword()
        .map(pascal_case)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| ANY.to_string())
}

fn native(ir_type: &IrType) -> String {
    match ir_type {
        IrType::String => "String".to_string(),
        IrType::Number => "Double".to_string(),
        IrType::Integer => "Int".to_string(),
        IrType::Boolean => "Bool".to_string(),
        IrType::Array(inner) => format!("[{}]", native(inner)),
        IrType::Object => "[String: Any]".to_string(),
        IrType::Other(_) => pascal_keyword(ir_type),
        IrType::Null | IrType::Any => ANY.to_string(),
    }
}

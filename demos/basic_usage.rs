use coded_errors::{
    OptionExt, Result, ResultExt, StructuredError, definitions, ensure_code, with_default_code,
};
use std::collections::HashMap;

fn parse_limit(raw: &str) -> Result<u32> {
    let limit = raw
        .parse::<u32>()
        .wrap_err_with("parse limit", [with_default_code(definitions::BAD_REQUEST)])?;
    ensure_code!(limit <= 100, definitions::VALIDATION_ERROR, "limit {} above 100", limit);
    Ok(limit)
}

fn find_user(users: &HashMap<u32, &'static str>, id: u32) -> Result<&'static str> {
    users
        .get(&id)
        .copied()
        .ok_or_code(format!("user {} not found", id), definitions::NOT_FOUND)
}

fn report(label: &str, err: &StructuredError) {
    println!("{label}");
    println!("   rendered: {err}");
    println!("   code:     {}", err.code());
    println!("   message:  {}", err.message());
}

fn main() {
    println!("--- Basic Usage Example ---\n");

    match parse_limit("ten") {
        Ok(limit) => println!("limit = {limit}"),
        // Plain parse error, so the default code applies.
        Err(err) => report("1. [PARSE FAILURE]", &err),
    }

    match parse_limit("500") {
        Ok(limit) => println!("limit = {limit}"),
        Err(err) => report("\n2. [VALIDATION FAILURE]", &err),
    }

    let users = HashMap::from([(1, "ada"), (2, "grace")]);
    let lookup = find_user(&users, 7).wrap_err("handle request");
    match lookup {
        Ok(name) => println!("found {name}"),
        // The outer layer inherits NOT_FOUND from the lookup error.
        Err(err) => report("\n3. [INHERITED CODE]", &err),
    }
}

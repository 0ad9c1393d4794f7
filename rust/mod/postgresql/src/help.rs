//! Help text for the roles endpoint.

pub const ROLE_HELP_SYNOPSIS: &str = "Define the database roles this backend can issue credentials for.";

pub const ROLE_HELP_DESCRIPTION: &str = r#"Each role is a name plus one SQL statement that creates a database login.

Write a role with a single "sql" field. The statement may use these
placeholders, written as {{key}}, which are filled in when credentials
are issued:

  {{name}}        generated username
  {{password}}    generated password
  {{expiration}}  time at which the login expires

Any other {{...}} text is left as written.

When a role is written the statement is rendered with test values and
prepared against the configured database. It is parsed, never run. If the
database cannot parse it, the role is rejected and the database's message
is returned.

Example:

  CREATE ROLE "{{name}}" WITH
    LOGIN
    PASSWORD '{{password}}'
    VALID UNTIL '{{expiration}}';

A login created this way has no privileges of its own. Grant access by
creating group roles in the database ahead of time and adding
IN ROLE <group> to the statement.
"#;

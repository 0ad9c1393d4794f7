use tracing::{info, warn};

use crate::model::{RoleEntry, RoleName};
use crate::service::{PostgresqlService, RoleError, template};

impl PostgresqlService {
    /// Test `sql` against the database, then store it under `name`.
    ///
    /// Nothing is written unless the database accepted the rendered statement.
    /// An existing role with the same name is replaced.
    pub async fn create_role(&self, name: &RoleName, sql: String) -> Result<(), RoleError> {
        if let Err(e) = template::validate(&sql, self.db.as_ref()).await {
            warn!(role = %name, error = %e, "role statement rejected");
            return Err(e);
        }

        self.roles.put(name, &RoleEntry { sql })?;
        info!(role = %name, "role stored");
        Ok(())
    }

    /// Read a role's template exactly as it was written.
    pub fn read_role(&self, name: &RoleName) -> Result<Option<RoleEntry>, RoleError> {
        self.roles.get(name)
    }

    /// Delete a role. Succeeds whether or not it existed.
    pub fn delete_role(&self, name: &RoleName) -> Result<(), RoleError> {
        self.roles.delete(name)?;
        info!(role = %name, "role deleted");
        Ok(())
    }

    /// Names of all stored roles.
    pub fn list_roles(&self) -> Result<Vec<String>, RoleError> {
        self.roles.list()
    }
}

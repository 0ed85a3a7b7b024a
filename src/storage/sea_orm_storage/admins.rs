//! 认证主体与管理员存储操作

use super::{SeaOrmStorage, map_write_err};
use crate::entity::admins::{ActiveModel, Column, Entity as Admins};
use crate::entity::students::Entity as Students;
use crate::entity::teachers::Entity as Teachers;
use crate::entity::{students, teachers};
use crate::errors::{LinkLearnError, Result};
use crate::models::auth::{Admin, Principal, Role};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 按角色从对应的表加载主体
    pub async fn get_principal_impl(&self, id: i64, role: Role) -> Result<Option<Principal>> {
        let principal = match role {
            Role::Student => Students::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(|e| LinkLearnError::database_operation(format!("查询学生失败: {e}")))?
                .map(|m| Principal {
                    id: m.id,
                    role,
                    name: format!("{} {}", m.first_name, m.last_name),
                    email: m.email,
                }),
            Role::Teacher => Teachers::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(|e| LinkLearnError::database_operation(format!("查询教师失败: {e}")))?
                .map(|m| Principal {
                    id: m.id,
                    role,
                    name: format!("{} {}", m.first_name, m.last_name),
                    email: m.email,
                }),
            Role::Admin => Admins::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(|e| LinkLearnError::database_operation(format!("查询管理员失败: {e}")))?
                .map(|m| Principal {
                    id: m.id,
                    role,
                    name: "Administrator".to_string(),
                    email: m.email,
                }),
        };

        Ok(principal)
    }

    pub async fn get_admin_by_email_impl(&self, email: &str) -> Result<Option<Admin>> {
        let result = Admins::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("查询管理员失败: {e}")))?;

        Ok(result.map(|m| m.into_admin()))
    }

    pub async fn count_admins_impl(&self) -> Result<u64> {
        Admins::find()
            .count(&self.db)
            .await
            .map_err(|e| LinkLearnError::database_operation(format!("统计管理员数量失败: {e}")))
    }

    pub async fn create_admin_impl(&self, email: &str, password_hash: &str) -> Result<Admin> {
        let model = ActiveModel {
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(map_write_err("创建管理员失败", "Admin email already exists"))?;

        Ok(result.into_admin())
    }

    /// 按角色更新密码哈希
    pub async fn update_password_impl(
        &self,
        role: Role,
        id: i64,
        password_hash: &str,
    ) -> Result<bool> {
        let result = match role {
            Role::Student => {
                Students::update_many()
                    .col_expr(students::Column::PasswordHash, Expr::value(password_hash))
                    .filter(students::Column::Id.eq(id))
                    .exec(&self.db)
                    .await
            }
            Role::Teacher => {
                Teachers::update_many()
                    .col_expr(teachers::Column::PasswordHash, Expr::value(password_hash))
                    .filter(teachers::Column::Id.eq(id))
                    .exec(&self.db)
                    .await
            }
            Role::Admin => {
                Admins::update_many()
                    .col_expr(Column::PasswordHash, Expr::value(password_hash))
                    .filter(Column::Id.eq(id))
                    .exec(&self.db)
                    .await
            }
        }
        .map_err(|e| LinkLearnError::database_operation(format!("更新密码失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

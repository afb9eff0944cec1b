use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202601050008_create_certificates"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // certificate_templates
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("certificate_templates"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("seminar_id"))
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Alias::new("image_path")).string().null())
                    .col(
                        ColumnDef::new(Alias::new("template_width"))
                            .integer()
                            .not_null()
                            .default(2000),
                    )
                    .col(
                        ColumnDef::new(Alias::new("template_height"))
                            .integer()
                            .not_null()
                            .default(1414),
                    )
                    .col(
                        ColumnDef::new(Alias::new("name_x_percent"))
                            .float()
                            .not_null()
                            .default(50.0),
                    )
                    .col(
                        ColumnDef::new(Alias::new("name_y_percent"))
                            .float()
                            .not_null()
                            .default(38.9),
                    )
                    .col(
                        ColumnDef::new(Alias::new("name_font_size"))
                            .integer()
                            .not_null()
                            .default(128),
                    )
                    .col(
                        ColumnDef::new(Alias::new("name_font"))
                            .string()
                            .not_null()
                            .default("Arial.ttf"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("name_color"))
                            .string_len(7)
                            .not_null()
                            .default("#000000"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("title_x_percent"))
                            .float()
                            .not_null()
                            .default(50.0),
                    )
                    .col(
                        ColumnDef::new(Alias::new("title_y_percent"))
                            .float()
                            .not_null()
                            .default(28.3),
                    )
                    .col(
                        ColumnDef::new(Alias::new("title_font_size"))
                            .integer()
                            .not_null()
                            .default(80),
                    )
                    .col(
                        ColumnDef::new(Alias::new("title_font"))
                            .string()
                            .not_null()
                            .default("Arial.ttf"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("title_color"))
                            .string_len(7)
                            .not_null()
                            .default("#1a1a1a"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("show_title"))
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Alias::new("default_used"))
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Alias::new("uploaded_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cert_template_seminar")
                            .from(
                                Alias::new("certificate_templates"),
                                Alias::new("seminar_id"),
                            )
                            .to(Alias::new("seminars"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // certificate_records
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("certificate_records"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("seminar_id"))
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new("user_id"))
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("email")).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new("sent_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cert_record_seminar")
                            .from(Alias::new("certificate_records"), Alias::new("seminar_id"))
                            .to(Alias::new("seminars"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cert_record_user")
                            .from(Alias::new("certificate_records"), Alias::new("user_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_cert_record_seminar_user")
                    .table(Alias::new("certificate_records"))
                    .col(Alias::new("seminar_id"))
                    .col(Alias::new("user_id"))
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(Alias::new("certificate_records"))
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(Alias::new("certificate_templates"))
                    .to_owned(),
            )
            .await
    }
}

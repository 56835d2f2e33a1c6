//! Payments relation manager for orders.

use crate::directory::AdminDirectory;
use crate::format::headline;
use crate::models::shop::{Order, Payment};
use crate::relation_managers::RelationManager;
use crate::schema::form::{
    Field, FormSchema, OptionsSource, Rule, Section, SelectConfig, SelectOption,
};
use crate::schema::table::{BulkAction, Column, HeaderAction, RowAction, TableSchema};

/// The payments relation manager.
pub struct PaymentsRelationManager;

impl RelationManager for PaymentsRelationManager {
    type Parent = Order;
    type Child = Payment;

    const RELATIONSHIP: &'static str = "payments";
    const RECORD_TITLE_ATTRIBUTE: &'static str = "reference";

    fn title() -> &'static str {
        "Pagamentos"
    }

    fn model_label() -> &'static str {
        "Pagamento"
    }

    fn plural_model_label() -> &'static str {
        "Pagamentos"
    }

    fn form() -> FormSchema {
        FormSchema::new(2).section(
            Section::new()
                .columns(2)
                .field(Field::text("reference").label("Referência").span_full().required())
                .field(
                    Field::numeric("amount")
                        .label("Valor")
                        .rule(Rule::MoneyFormat)
                        .required(),
                )
                .field(
                    Field::select("currency", SelectConfig::new(OptionsSource::Currencies).searchable())
                        .label("Moeda")
                        .required(),
                )
                .field(
                    Field::select(
                        "provider",
                        SelectConfig::new(OptionsSource::Static(vec![
                            SelectOption::new("stripe", "Stripe"),
                            SelectOption::new("paypal", "PayPal"),
                        ]))
                        .not_native(),
                    )
                    .label("Provedor")
                    .required(),
                )
                .field(
                    Field::select(
                        "method",
                        SelectConfig::new(OptionsSource::Static(vec![
                            SelectOption::new("credit_card", "Cartão de Crédito"),
                            SelectOption::new("bank_transfer", "Transferência Bancária"),
                            SelectOption::new("paypal", "PayPal"),
                        ]))
                        .not_native(),
                    )
                    .label("Forma de Pagamento")
                    .required(),
                ),
        )
    }

    fn table() -> TableSchema<Payment> {
        TableSchema::new()
            .column(Column::text("reference", "Referência").searchable())
            .column(Column::text("amount", "Valor").sortable().money())
            .column(Column::text("provider", "Provedor").state(provider_headline))
            .column(Column::text("method", "Forma de Pagamento").state(method_headline))
            .header_action(HeaderAction::Create)
            .action(RowAction::Edit)
            .action(RowAction::Delete)
            .bulk_action(BulkAction::delete())
    }
}

fn provider_headline(record: &Payment, _: &dyn AdminDirectory) -> Option<String> {
    Some(headline(&record.provider.to_string()))
}

fn method_headline(record: &Payment, _: &dyn AdminDirectory) -> Option<String> {
    Some(headline(&record.method.to_string()))
}

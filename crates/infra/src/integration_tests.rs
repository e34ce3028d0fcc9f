//! End-to-end customer lifecycle through the factory, once per backend.

#[cfg(test)]
mod tests {
    use rolodex_core::Entity;
    use rolodex_customers::{Address, CustomerError, CustomerRepository, SaveOutcome};

    use crate::config::StoreConfig;
    use crate::factory::CustomerFactory;

    fn backends() -> Vec<(&'static str, CustomerRepository)> {
        vec![
            (
                "memory",
                CustomerFactory::new(StoreConfig::in_memory())
                    .create_repository()
                    .unwrap(),
            ),
            (
                "sqlite",
                CustomerFactory::new(StoreConfig::sqlite("sqlite::memory:"))
                    .create_repository()
                    .unwrap(),
            ),
        ]
    }

    #[test]
    fn create_read_update_delete() {
        for (backend, repo) in backends() {
            let mut customer = repo.get_new_customer();
            customer.set_first_name("John");
            customer.set_last_name("Doe");
            customer.set_company_name("Acme Corp");
            customer.set_address(&Address::with_fields(
                Some("123 Main St"),
                Some("New York"),
                Some("NY"),
                Some("10001"),
            ));

            assert_eq!(customer.try_save().unwrap(), SaveOutcome::Inserted, "{backend}");
            let id = customer.id();
            assert!(id.is_persisted(), "{backend}");
            assert_eq!(customer.address().customer_id(), id, "{backend}");

            let mut loaded = repo.get_customer_by_id(id).expect(backend);
            assert_eq!(
                loaded.address().address_block(),
                "123 Main St\nNew York, NY 10001",
                "{backend}"
            );

            loaded.set_company_name("Acme Holdings");
            loaded.address_mut().set_street("1 Broadway");
            assert_eq!(loaded.try_save().unwrap(), SaveOutcome::Updated, "{backend}");

            let reloaded = repo.get_customer_by_id(id).expect(backend);
            assert_eq!(reloaded.company_name(), Some("Acme Holdings"), "{backend}");
            assert_eq!(reloaded.address().street(), Some("1 Broadway"), "{backend}");
            assert_eq!(reloaded.address().id(), customer.address().id(), "{backend}");

            let mut doomed = reloaded;
            assert!(doomed.delete(), "{backend}");
            assert!(doomed.is_transient(), "{backend}");
            assert!(repo.get_customer_by_id(id).is_none(), "{backend}");
            assert!(repo.get_list().is_empty(), "{backend}");
        }
    }

    #[test]
    fn invalid_customer_never_reaches_the_store() {
        for (backend, repo) in backends() {
            let mut customer = repo.get_new_customer();
            customer.set_first_name("Jane");
            customer.set_company_name("Tech Inc");

            assert!(!customer.save(), "{backend}");
            assert!(customer.is_transient(), "{backend}");
            assert!(repo.get_list().is_empty(), "{backend}");
        }
    }

    #[test]
    fn customer_without_address_gets_one_on_later_save() {
        for (backend, repo) in backends() {
            let mut customer = repo.get_new_customer();
            customer.set_last_name("Lee");
            customer.set_company_name("Lee LLC");
            assert!(customer.save(), "{backend}");
            assert!(customer.address().is_transient(), "{backend}");

            let mut loaded = repo.get_customer_by_id(customer.id()).expect(backend);
            assert!(loaded.address().is_empty(), "{backend}");
            loaded.address_mut().set_city("Seoul");
            assert!(loaded.save(), "{backend}");
            assert!(loaded.address().id().is_persisted(), "{backend}");

            let reloaded = repo.get_customer_by_id(customer.id()).expect(backend);
            assert_eq!(reloaded.address().address_block(), "Seoul", "{backend}");
        }
    }

    #[test]
    fn list_is_sorted_by_name_and_second_delete_is_rejected() {
        for (backend, repo) in backends() {
            for (first, last) in [("Jane", "Smith"), ("John", "Doe"), ("Adam", "Doe")] {
                let mut c = repo.get_new_customer();
                c.set_first_name(first);
                c.set_last_name(last);
                c.set_company_name("Co");
                assert!(c.save(), "{backend}");
            }

            let names: Vec<String> = repo
                .get_list()
                .iter()
                .map(|c| format!("{} {}", c.first_name().unwrap(), c.last_name().unwrap()))
                .collect();
            assert_eq!(names, vec!["Adam Doe", "John Doe", "Jane Smith"], "{backend}");

            let mut first = repo.get_list().remove(0);
            assert!(first.delete(), "{backend}");
            assert!(matches!(first.try_delete(), Err(CustomerError::NotPersisted)), "{backend}");
            assert_eq!(repo.get_list().len(), 2, "{backend}");
        }
    }
}

pub mod books;

use bookstack_db::Store;
use bookstack_kernel::ModuleRegistry;

/// Register all feature modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, store: &Store) {
    registry.register(books::create_module(store));
}

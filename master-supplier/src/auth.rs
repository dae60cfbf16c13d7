multiversx_sc::imports!();

// ============================================================
// Authorization Registry
//
// Two levels on top of the built-in contract owner: an
// unordered set of authorized callers (owner-managed), and
// per-role self-service — the current holder of a named fee
// address may always rotate that one address itself.
// ============================================================

#[multiversx_sc::module]
pub trait AuthModule {
    #[only_owner]
    #[endpoint(addAuthorized)]
    fn add_authorized(&self, addr: ManagedAddress) {
        self.authorized().insert(addr.clone());
        self.authorized_added_event(&addr);
    }

    #[only_owner]
    #[endpoint(removeAuthorized)]
    fn remove_authorized(&self, addr: ManagedAddress) {
        self.authorized().swap_remove(&addr);
        self.authorized_removed_event(&addr);
    }

    /// Owner or a member of the authorized set.
    fn require_authorized(&self) {
        let caller = self.blockchain().get_caller();
        require!(self.is_authorized(&caller), "unauthorized");
    }

    /// Owner, authorized, or the current holder of the role —
    /// the single capability check behind every named address
    /// setter.
    fn require_authorized_or_role_holder(&self, role_holder: &ManagedAddress) {
        let caller = self.blockchain().get_caller();
        require!(
            caller == *role_holder || self.is_authorized(&caller),
            "unauthorized"
        );
    }

    fn is_authorized(&self, caller: &ManagedAddress) -> bool {
        *caller == self.blockchain().get_owner_address() || self.authorized().contains(caller)
    }

    #[view(isAuthorized)]
    fn is_authorized_view(&self, addr: ManagedAddress) -> bool {
        self.is_authorized(&addr)
    }

    #[event("authorizedAdded")]
    fn authorized_added_event(&self, #[indexed] addr: &ManagedAddress);

    #[event("authorizedRemoved")]
    fn authorized_removed_event(&self, #[indexed] addr: &ManagedAddress);

    #[storage_mapper("authorized")]
    fn authorized(&self) -> UnorderedSetMapper<ManagedAddress>;
}

use common_structs::{Position, ProtocolParameters};

multiversx_sc::imports!();

/// Per call snapshot of the configuration and the block time.
///
/// Built once at the top of every endpoint so that all checks of one call
/// see the same parameters and the same `now`.
pub struct Cache<'a, C>
where
    C: crate::storage::Storage,
{
    sc_ref: &'a C,

    pub parameters: ProtocolParameters<C::Api>,
    pub current_timestamp: u64,
}

impl<'a, C> Cache<'a, C>
where
    C: crate::storage::Storage,
{
    pub fn new(sc_ref: &'a C) -> Self {
        Cache {
            sc_ref,
            parameters: sc_ref.protocol_parameters().get(),
            current_timestamp: sc_ref.blockchain().get_block_timestamp(),
        }
    }

    /// Reads the stored position of `account`, or a fresh one starting now.
    pub fn get_position(&self, account: &ManagedAddress<C::Api>) -> Position<C::Api> {
        let mapper = self.sc_ref.positions(account);
        if mapper.is_empty() {
            return Position::new(self.current_timestamp);
        }

        mapper.get()
    }

    pub fn is_stable_token(&self, token_id: &EgldOrEsdtTokenIdentifier<C::Api>) -> bool {
        *token_id == EgldOrEsdtTokenIdentifier::esdt(self.parameters.stable_token.clone())
    }
}

//! Methods and notifications the wallet serves per namespace.

/// Methods callable on the bare `wallet` scope.
pub const KNOWN_WALLET_RPC_METHODS: &[&str] = &["wallet_registerOnboarding", "wallet_scanQRCode"];

/// Methods callable on the `wallet:eip155` scope.
pub const KNOWN_WALLET_EIP155_RPC_METHODS: &[&str] = &["wallet_addEthereumChain"];

/// Methods callable on `eip155` scopes.
pub const KNOWN_EIP155_RPC_METHODS: &[&str] = &[
    "eth_accounts",
    "eth_blockNumber",
    "eth_call",
    "eth_chainId",
    "eth_coinbase",
    "eth_decrypt",
    "eth_estimateGas",
    "eth_feeHistory",
    "eth_gasPrice",
    "eth_getBalance",
    "eth_getBlockByHash",
    "eth_getBlockByNumber",
    "eth_getBlockReceipts",
    "eth_getBlockTransactionCountByHash",
    "eth_getBlockTransactionCountByNumber",
    "eth_getCode",
    "eth_getEncryptionPublicKey",
    "eth_getFilterChanges",
    "eth_getFilterLogs",
    "eth_getLogs",
    "eth_getProof",
    "eth_getStorageAt",
    "eth_getTransactionByBlockHashAndIndex",
    "eth_getTransactionByBlockNumberAndIndex",
    "eth_getTransactionByHash",
    "eth_getTransactionCount",
    "eth_getTransactionReceipt",
    "eth_getUncleCountByBlockHash",
    "eth_getUncleCountByBlockNumber",
    "eth_maxPriorityFeePerGas",
    "eth_newBlockFilter",
    "eth_newFilter",
    "eth_newPendingTransactionFilter",
    "eth_requestAccounts",
    "eth_sendRawTransaction",
    "eth_sendTransaction",
    "eth_signTypedData_v4",
    "eth_subscribe",
    "eth_syncing",
    "eth_uninstallFilter",
    "eth_unsubscribe",
    "personal_sign",
    "wallet_getCallsStatus",
    "wallet_getCapabilities",
    "wallet_getPermissions",
    "wallet_requestPermissions",
    "wallet_revokePermissions",
    "wallet_sendCalls",
    "wallet_switchEthereumChain",
    "wallet_watchAsset",
    "web3_clientVersion",
    "web3_sha3",
];

/// Notifications emitted on `eip155` scopes.
pub const KNOWN_EIP155_NOTIFICATIONS: &[&str] = &["eth_subscription"];

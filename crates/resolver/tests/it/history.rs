use crate::utils::*;
use alloy_primitives::{Address, hex};
use ens_primitives::{abi::encode_address, namehash};
use ens_resolver::{
    ContentHash, Ens, HistoryEntry, NameResolver,
    constants::{ADDR_CHANGED, CONTENTHASH_CHANGED, ENS_REGISTRY, RESOLVER as RESOLVER_OF},
};
use ens_rpc::BlockTag;
use serde_json::{Value, json};
use std::sync::Arc;

const T1: u64 = 1_600_000_000;
const T2: u64 = 1_700_000_000;
const T3: u64 = 1_500_000_000;

fn log(block: u64, data: &str) -> Value {
    json!({
        "address": "0x4976fb03c32e5b8cfe2b6ccb31c09ba78ebaba41",
        "topics": [ADDR_CHANGED, namehash("vitalik.eth")],
        "data": data,
        "blockNumber": format!("{block:#x}"),
        "transactionHash": format!("0x{block:064x}"),
        "logIndex": "0x0",
    })
}

fn address_data(address: Address) -> String {
    format!("0x{}", encode_address(&address))
}

fn client() -> MockClient {
    MockClient::new().on_call(ENS_REGISTRY, RESOLVER_OF, address_result(RESOLVER))
}

async fn resolver_for(ens: Ens) -> NameResolver {
    ens.resolver("vitalik.eth").await.unwrap().unwrap()
}

#[tokio::test]
async fn addr_history_newest_first() {
    crate::init_tracing();
    let (a1, a2, a3) = (Address::repeat_byte(1), Address::repeat_byte(2), Address::repeat_byte(3));
    let client = client()
        .on_logs(json!([
            log(100, &address_data(a1)),
            log(200, &address_data(a2)),
            log(300, &address_data(a3)),
        ]))
        .on_block(100, T1)
        .on_block(200, T2)
        .on_block(300, T3)
        .into_arc();
    let resolver = resolver_for(Ens::with_client(client.clone())).await;

    let history = resolver.addr_history().await.unwrap();
    similar_asserts::assert_eq!(
        history,
        vec![
            HistoryEntry { timestamp: T2, block_number: 200, value: a2 },
            HistoryEntry { timestamp: T1, block_number: 100, value: a1 },
            HistoryEntry { timestamp: T3, block_number: 300, value: a3 },
        ]
    );

    let requests = client.requests();
    let get_logs = requests.iter().find(|r| r.method == "eth_getLogs").unwrap();
    similar_asserts::assert_eq!(
        get_logs.params,
        json!([{
            "address": "0x4976fb03c32e5b8cfe2b6ccb31c09ba78ebaba41",
            "topics": [ADDR_CHANGED, namehash("vitalik.eth")],
            "fromBlock": "earliest",
            "toBlock": "latest",
        }])
    );
    let blocks = requests.iter().filter(|r| r.method == "eth_getBlockByNumber").count();
    assert_eq!(blocks, 3);
}

#[tokio::test]
async fn one_block_fetch_per_block() {
    let client = client()
        .on_logs(json!([
            log(100, &address_data(Address::repeat_byte(1))),
            log(100, &address_data(Address::repeat_byte(2))),
        ]))
        .on_block(100, T1)
        .into_arc();
    let resolver = resolver_for(Ens::with_client(client.clone())).await;

    let values =
        resolver.addr_history().await.unwrap().into_iter().map(|e| e.value).collect::<Vec<_>>();
    assert_eq!(values, [Address::repeat_byte(1), Address::repeat_byte(2)]);

    let blocks = client.requests().into_iter().filter(|r| r.method == "eth_getBlockByNumber");
    assert_eq!(blocks.map(|r| r.params).collect::<Vec<_>>(), [json!(["0x64", false])]);
}

#[tokio::test]
async fn incomplete_logs_are_skipped() {
    let mut without_data = log(200, "0x");
    without_data.as_object_mut().unwrap().remove("data");
    let mut without_block = log(300, &address_data(Address::repeat_byte(3)));
    without_block.as_object_mut().unwrap().remove("blockNumber");

    let client = client()
        .on_logs(json!([
            log(100, &address_data(Address::repeat_byte(1))),
            without_data,
            without_block,
            // too short to hold an address
            log(400, "0x1234"),
        ]))
        .on_block(100, T1)
        .on_block(200, T2)
        .on_block(400, T3)
        .into_arc();
    let resolver = resolver_for(Ens::with_client(client)).await;

    let history = resolver.addr_history().await.unwrap();
    assert_eq!(
        history,
        vec![HistoryEntry { timestamp: T1, block_number: 100, value: Address::repeat_byte(1) }]
    );
}

#[tokio::test]
async fn unknown_blocks_are_skipped() {
    let client = client()
        .on_logs(json!([
            log(100, &address_data(Address::repeat_byte(1))),
            log(200, &address_data(Address::repeat_byte(2))),
        ]))
        .on_block(100, T1)
        .into_arc();
    let resolver = resolver_for(Ens::with_client(client)).await;

    let history = resolver.addr_history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].block_number, 100);
}

#[tokio::test]
async fn no_logs_no_history() {
    let client = client().into_arc();
    let resolver = resolver_for(Ens::with_client(client.clone())).await;

    assert!(resolver.addr_history().await.unwrap().is_empty());
    assert!(client.requests().iter().all(|r| r.method != "eth_getBlockByNumber"));
}

#[tokio::test]
async fn contenthash_history() {
    let ipfs = hex::decode(
        "e3010170122029f2d17be6139079dc48696d1f582a8530eb9805b561eda517e22a892c7e3f1f",
    )
    .unwrap();
    let client = client()
        .on_logs(json!([
            log(100, &bytes_result(&ipfs)),
            log(200, &bytes_result(&[0xde, 0xad])),
        ]))
        .on_block(100, T1)
        .on_block(200, T2)
        .into_arc();
    let resolver = resolver_for(Ens::with_client(client.clone())).await;

    let history = resolver.contenthash_history().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].value, None);
    assert_eq!(
        history[1].value.as_ref().map(ContentHash::to_string).as_deref(),
        Some("ipfs://QmRAQB6YaCyidP37UdDnjFY5vQuiBrcqdyoW1CuDgwxkD4")
    );

    let get_logs = client.requests().into_iter().find(|r| r.method == "eth_getLogs").unwrap();
    assert_eq!(get_logs.params[0]["topics"][0], json!(CONTENTHASH_CHANGED));
}

#[tokio::test]
async fn custom_history_range() {
    let client = client().into_arc();
    let ens = Ens::with_client(client.clone())
        .history_range(BlockTag::Number(9_380_380), BlockTag::Number(9_400_000));
    resolver_for(ens).await.addr_history().await.unwrap();

    let get_logs = client.requests().into_iter().find(|r| r.method == "eth_getLogs").unwrap();
    assert_eq!(get_logs.params[0]["fromBlock"], "0x8f221c");
    assert_eq!(get_logs.params[0]["toBlock"], "0x8f6ec0");
}

#[tokio::test]
async fn node_errors_propagate() {
    let client = Arc::new(client().on_logs(json!({ "not": "a list" })));
    let resolver = resolver_for(Ens::with_client(client)).await;
    assert!(resolver.addr_history().await.is_err());
}

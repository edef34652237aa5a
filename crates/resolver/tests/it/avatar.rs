use crate::utils::*;
use alloy_primitives::{Address, U256};
use ens_resolver::{
    Avatar, Ens, NameResolver, OpenSea,
    constants::{
        ADDR, BALANCE_OF, ENS_REGISTRY, OWNER_OF, RESOLVER as RESOLVER_OF, TEXT, TOKEN_URI, URI,
    },
};
use std::sync::Arc;

const ERC721_AVATAR: &str = "eip155:1/erc721:0xbc4ca0eda7647a8ab7c2061c2e118a18a936f13d/42";
const METADATA_URI: &str = "ipfs://ipfs/QmeSjSinHpPnmXmspMjwiXyN6zS4E9zccariGR3jxcaWtq/42";
const ERC1155_AVATAR: &str = "eip155:1/erc1155:0xbc4ca0eda7647a8ab7c2061c2e118a18a936f13d/42";
const ERC20_AVATAR: &str = "eip155:1/erc20:0xbc4ca0eda7647a8ab7c2061c2e118a18a936f13d/42";

fn client_with_avatar(avatar: &str) -> MockClient {
    MockClient::new()
        .on_call(ENS_REGISTRY, RESOLVER_OF, address_result(RESOLVER))
        .on_call(RESOLVER, TEXT, string_result(avatar))
}

async fn resolver_for(client: Arc<MockClient>) -> NameResolver {
    Ens::with_client(client).resolver("vitalik.eth").await.unwrap().unwrap()
}

#[tokio::test]
async fn url_avatars() {
    let client = client_with_avatar("https://example.com/a.png").into_arc();
    let resolver = resolver_for(client.clone()).await;

    let avatar = resolver.avatar().await.unwrap().unwrap();
    assert!(matches!(avatar, Avatar::Http(_)));
    let url = resolver.avatar_image_url(&avatar).await.unwrap().unwrap();
    assert_eq!(url.as_str(), "https://example.com/a.png");

    // no ownership checks for plain URLs
    assert!(!client.call_targets().iter().any(|(_, selector)| *selector == ADDR));
}

#[tokio::test]
async fn unknown_avatar_is_kept() {
    let client = client_with_avatar("just some text").into_arc();
    let resolver = resolver_for(client).await;

    let avatar = resolver.avatar().await.unwrap().unwrap();
    assert_eq!(avatar, Avatar::Unknown("just some text".to_string()));
    assert_eq!(resolver.avatar_image_url(&avatar).await.unwrap(), None);
    assert_eq!(resolver.avatar_image().await.unwrap(), None);
}

#[tokio::test]
async fn no_avatar_record() {
    let client = client_with_avatar("").into_arc();
    let resolver = resolver_for(client).await;
    assert_eq!(resolver.avatar().await.unwrap(), None);
}

#[tokio::test]
async fn erc721_owned_by_name() {
    let client = client_with_avatar(ERC721_AVATAR)
        .on_call(RESOLVER, ADDR, address_result(OWNER))
        .on_call(TOKEN, OWNER_OF, address_result(OWNER))
        .into_arc();
    let resolver = resolver_for(client.clone()).await;

    let avatar = resolver.avatar().await.unwrap().unwrap();
    let token = avatar.token().unwrap();
    assert!(matches!(avatar, Avatar::Erc721(_)));
    assert_eq!((token.contract, token.token_id), (TOKEN, U256::from(42)));

    let owner_of =
        client.requests().into_iter().find(|r| r.call_target() == Some((TOKEN, OWNER_OF)));
    assert_eq!(
        owner_of.unwrap().call_data().unwrap(),
        format!("0x6352211e{:0>64}", "2a")
    );
}

#[tokio::test]
async fn erc721_owned_by_someone_else() {
    let client = client_with_avatar(ERC721_AVATAR)
        .on_call(RESOLVER, ADDR, address_result(OWNER))
        .on_call(TOKEN, OWNER_OF, address_result(Address::repeat_byte(0x11)))
        .into_arc();
    let resolver = resolver_for(client).await;

    assert_eq!(resolver.avatar().await.unwrap(), None);
    assert_eq!(resolver.avatar_image().await.unwrap(), None);
}

#[tokio::test]
async fn token_avatar_without_address() {
    let client = client_with_avatar(ERC721_AVATAR).into_arc();
    let resolver = resolver_for(client.clone()).await;

    assert_eq!(resolver.avatar().await.unwrap(), None);
    // the token contract is never consulted
    assert!(client.call_targets().iter().all(|(to, _)| *to != TOKEN));
}

#[tokio::test]
async fn other_token_standards_need_an_address() {
    let client = client_with_avatar(ERC20_AVATAR).into_arc();
    let resolver = resolver_for(client.clone()).await;
    assert_eq!(resolver.avatar().await.unwrap(), None);
    assert!(client.call_targets().contains(&(RESOLVER, ADDR)));

    let client = client_with_avatar(ERC20_AVATAR).on_call(RESOLVER, ADDR, address_result(OWNER));
    let resolver = resolver_for(client.into_arc()).await;
    assert_eq!(resolver.avatar().await.unwrap(), Some(Avatar::Unknown(ERC20_AVATAR.to_string())));
}

#[tokio::test]
async fn address_errors_propagate() {
    let client = client_with_avatar(ERC20_AVATAR).on_call_revert(RESOLVER, ADDR).into_arc();
    let resolver = resolver_for(client).await;
    assert!(resolver.avatar().await.is_err());
}

#[tokio::test]
async fn erc1155_balance() {
    let held = client_with_avatar(ERC1155_AVATAR)
        .on_call(RESOLVER, ADDR, address_result(OWNER))
        .on_call(TOKEN, BALANCE_OF, uint_result(3))
        .into_arc();
    let avatar = resolver_for(held.clone()).await.avatar().await.unwrap().unwrap();
    assert!(matches!(avatar, Avatar::Erc1155(_)));

    let balance_of =
        held.requests().into_iter().find(|r| r.call_target() == Some((TOKEN, BALANCE_OF)));
    assert_eq!(
        balance_of.unwrap().call_data().unwrap(),
        format!("0x00fdd58e{:0>64}{:0>64}", hex(OWNER), "2a")
    );

    let empty = client_with_avatar(ERC1155_AVATAR)
        .on_call(RESOLVER, ADDR, address_result(OWNER))
        .on_call(TOKEN, BALANCE_OF, uint_result(0))
        .into_arc();
    assert_eq!(resolver_for(empty).await.avatar().await.unwrap(), None);
}

fn hex(address: Address) -> String {
    alloy_primitives::hex::encode(address)
}

#[tokio::test]
async fn image_from_token_metadata() {
    let client = client_with_avatar(ERC721_AVATAR)
        .on_call(RESOLVER, ADDR, address_result(OWNER))
        .on_call(TOKEN, OWNER_OF, address_result(OWNER))
        .on_call(TOKEN, TOKEN_URI, string_result(METADATA_URI))
        .into_arc();
    let content = Arc::new(MockHttp::default().with(
        METADATA_URI,
        r#"{"image":"https://example.com/42.png","attributes":[]}"#,
    ));
    let http = Arc::new(MockHttp::default().with("https://example.com/42.png", b"png".to_vec()));
    let platform = Arc::new(MockPlatform::default());

    let ens = Ens::with_client(client)
        .content_fetcher(content.clone())
        .http_fetcher(http.clone())
        .nft_platform(platform.clone());
    let resolver = ens.resolver("vitalik.eth").await.unwrap().unwrap();

    let image = resolver.avatar_image().await.unwrap().unwrap();
    assert_eq!(image.as_ref(), b"png");
    assert_eq!(http.requests(), ["https://example.com/42.png"]);
    assert!(platform.lookups().is_empty());
}

#[tokio::test]
async fn reverting_token_uri_falls_back_to_platform() {
    let client = client_with_avatar(ERC721_AVATAR)
        .on_call(RESOLVER, ADDR, address_result(OWNER))
        .on_call(TOKEN, OWNER_OF, address_result(OWNER))
        .on_call_revert(TOKEN, TOKEN_URI)
        .into_arc();
    let platform = Arc::new(MockPlatform::with_image("https://example.com/from-platform.png"));
    let ens = Ens::with_client(client).nft_platform(platform.clone());
    let resolver = ens.resolver("vitalik.eth").await.unwrap().unwrap();

    let avatar = resolver.avatar().await.unwrap().unwrap();
    let url = resolver.avatar_image_url(&avatar).await.unwrap().unwrap();
    assert_eq!(url.as_str(), "https://example.com/from-platform.png");
    assert_eq!(platform.lookups(), [(TOKEN, U256::from(42))]);
}

#[tokio::test]
async fn erc1155_uri_substitutes_id() {
    let client = client_with_avatar(ERC1155_AVATAR)
        .on_call(RESOLVER, ADDR, address_result(OWNER))
        .on_call(TOKEN, BALANCE_OF, uint_result(1))
        .on_call(TOKEN, URI, string_result("https://meta.example/{id}.json"))
        .into_arc();
    let metadata_url = format!("https://meta.example/{:0>64}.json", "2a");
    let http = Arc::new(
        MockHttp::default().with(&metadata_url, r#"{"image":"https://meta.example/42.png"}"#),
    );
    let ens = Ens::with_client(client).http_fetcher(http.clone());
    let resolver = ens.resolver("vitalik.eth").await.unwrap().unwrap();

    let avatar = resolver.avatar().await.unwrap().unwrap();
    let url = resolver.avatar_image_url(&avatar).await.unwrap().unwrap();
    assert_eq!(url.as_str(), "https://meta.example/42.png");
    assert_eq!(http.requests(), [metadata_url]);
}

#[tokio::test]
async fn inline_data_avatar() {
    let client = client_with_avatar("data:image/svg+xml;base64,PHN2Zy8+").into_arc();
    let resolver = resolver_for(client).await;

    let image = resolver.avatar_image().await.unwrap().unwrap();
    assert_eq!(image.as_ref(), b"<svg/>");
}

#[tokio::test]
async fn reverting_uri_falls_back_to_platform() {
    let client = client_with_avatar(ERC1155_AVATAR)
        .on_call(RESOLVER, ADDR, address_result(OWNER))
        .on_call(TOKEN, BALANCE_OF, uint_result(1))
        .on_call_revert(TOKEN, URI)
        .into_arc();
    let platform = Arc::new(MockPlatform::with_image("https://example.com/from-platform.png"));
    let ens = Ens::with_client(client).nft_platform(platform.clone());
    let resolver = ens.resolver("vitalik.eth").await.unwrap().unwrap();

    let avatar = resolver.avatar().await.unwrap().unwrap();
    let url = resolver.avatar_image_url(&avatar).await.unwrap().unwrap();
    assert_eq!(url.as_str(), "https://example.com/from-platform.png");
    assert_eq!(platform.lookups(), [(TOKEN, U256::from(42))]);
}

#[tokio::test]
async fn empty_token_uri_falls_back_to_platform() {
    let client = client_with_avatar(ERC721_AVATAR)
        .on_call(RESOLVER, ADDR, address_result(OWNER))
        .on_call(TOKEN, OWNER_OF, address_result(OWNER))
        .on_call(TOKEN, TOKEN_URI, string_result(""))
        .into_arc();
    let platform = Arc::new(MockPlatform::with_image("https://example.com/from-platform.png"));
    let http = Arc::new(MockHttp::default());
    let ens = Ens::with_client(client).http_fetcher(http.clone()).nft_platform(platform.clone());
    let resolver = ens.resolver("vitalik.eth").await.unwrap().unwrap();

    let avatar = resolver.avatar().await.unwrap().unwrap();
    let url = resolver.avatar_image_url(&avatar).await.unwrap().unwrap();
    assert_eq!(url.as_str(), "https://example.com/from-platform.png");
    assert_eq!(platform.lookups(), [(TOKEN, U256::from(42))]);
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn malformed_platform_response_is_absent() {
    let client = client_with_avatar(ERC721_AVATAR)
        .on_call(RESOLVER, ADDR, address_result(OWNER))
        .on_call(TOKEN, OWNER_OF, address_result(OWNER))
        .on_call_revert(TOKEN, TOKEN_URI)
        .into_arc();
    let asset_url =
        "https://api.opensea.io/api/v1/asset/0xbc4ca0eda7647a8ab7c2061c2e118a18a936f13d/42/";
    let http = Arc::new(MockHttp::default().with(asset_url, "<html>rate limited</html>"));
    let ens = Ens::with_client(client).nft_platform(Arc::new(OpenSea::new(None, http.clone())));
    let resolver = ens.resolver("vitalik.eth").await.unwrap().unwrap();

    let avatar = resolver.avatar().await.unwrap().unwrap();
    assert_eq!(resolver.avatar_image_url(&avatar).await.unwrap(), None);
    assert_eq!(http.requests(), [asset_url]);
}

use studentvue::types::Error;
use studentvue::wrapper::StudentVue;

#[tokio::test]
async fn fail_login_without_district_url() {
    let res = StudentVue::builder().login("username", "password").await;
    assert!(matches!(res, Err(Error::InvalidInput("district_url", _))));
}

#[tokio::test]
async fn fail_login_with_blank_district_url() {
    let res = StudentVue::builder()
        .with_district_url("   ")
        .login("username", "password")
        .await;
    assert!(matches!(res, Err(Error::InvalidInput("district_url", _))));
}

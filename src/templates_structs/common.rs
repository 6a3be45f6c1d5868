use askama::Template;

#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub app_name: String,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub app_name: String,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub email: String,
    pub csrf_token: String,
}

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub app_name: String,
    pub errors: Vec<String>,
    pub email: String,
    pub full_name: String,
    pub csrf_token: String,
}

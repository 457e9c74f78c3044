/// PHP extensions installed in the `base` stage.
const PHP_EXTENSIONS: &[&str] = &[
    "bcmath",
    "exif",
    "gd",
    "gmp",
    "igbinary",
    "imagick",
    "imap",
    "intl",
    "mysqli",
    "opcache",
    "pcntl",
    "pdo_mysql",
    "pdo_oci",
    "pdo_pgsql",
    "pdo_sqlsrv",
    "redis",
    "sockets",
    "tidy",
    "xdebug",
    "xsl",
    "zip",
];

const SELENIUM_URL: &str = "https://selenium-release.storage.googleapis.com/3.141/selenium-server-standalone-3.141.59.jar";
const GECKODRIVER_URL: &str = "https://github.com/mozilla/geckodriver/releases/download/v0.28.0/geckodriver-v0.28.0-linux64.tar.gz";

/// Smoke test copied into and run inside every image.
pub const SMOKE_TEST: &str = "test.php";

/// Stage names, in build order.
pub const STAGES: &[&str] = &["base", "npm", "selenium"];

/// Targets that name no stage of the generated Dockerfile.
pub fn unknown_stages<'a>(targets: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    targets
        .into_iter()
        .filter(|target| !STAGES.contains(target))
        .collect()
}

/// Generates the three-stage PHP image Dockerfile for one runtime version.
pub struct DockerfileGenerator<'a> {
    version: &'a str,
}

impl<'a> DockerfileGenerator<'a> {
    pub fn new(version: &'a str) -> Self {
        Self { version }
    }

    pub fn render(&self) -> String {
        let extensions = PHP_EXTENSIONS.join(" \\\n    ");

        format!(
            r#"FROM php:{version}-alpine as base

# install common PHP extensions
COPY --from=mlocati/php-extension-installer /usr/bin/install-php-extensions /usr/local/bin/
RUN install-php-extensions {extensions}

# install Composer
RUN install-php-extensions @composer

# install other tools
RUN apk add bash git make

# run basic tests
COPY {smoke_test} ./
RUN php {smoke_test} && rm {smoke_test}
RUN composer diagnose


FROM base as npm

# install npm
RUN apk add npm


FROM npm as selenium

# install Selenium
RUN apk add openjdk11-jre-headless xvfb ttf-freefont \
    && curl --fail --silent --show-error -L "{selenium_url}" -o /opt/selenium-server-standalone.jar

# install Chrome
RUN apk add chromium chromium-chromedriver

# install Firefox
RUN apk add firefox \
    && curl --fail --silent --show-error -L "{geckodriver_url}" -o /tmp/geckodriver.tar.gz \
    && tar -C /opt -zxf /tmp/geckodriver.tar.gz && rm /tmp/geckodriver.tar.gz \
    && chmod 755 /opt/geckodriver && ln -s /opt/geckodriver /usr/bin/geckodriver
"#,
            version = self.version,
            extensions = extensions,
            smoke_test = SMOKE_TEST,
            selenium_url = SELENIUM_URL,
            geckodriver_url = GECKODRIVER_URL,
        )
    }
}
